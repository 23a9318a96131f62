//! 张量的文本展示：按行打印（一批 logits 即每个样本一行），行数过多时只显示首尾几行

use crate::tensor::Tensor;
use std::fmt;

/// 超过 `2 * EDGE_ROWS` 行时，首尾各保留的行数
const EDGE_ROWS: usize = 3;

fn write_row(f: &mut fmt::Formatter<'_>, row: &[f32]) -> fmt::Result {
    write!(f, "[")?;
    for (j, value) in row.iter().enumerate() {
        if j > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value:8.4}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = self.shape();
        let values: Vec<f32> = self.data.iter().copied().collect();

        match *shape {
            [] => write!(f, "{:8.4}", values[0])?,
            [_] => write_row(f, &values)?,
            [rows, cols] => {
                let shown: Vec<usize> = if rows > 2 * EDGE_ROWS {
                    (0..EDGE_ROWS).chain(rows - EDGE_ROWS..rows).collect()
                } else {
                    (0..rows).collect()
                };
                write!(f, "[")?;
                for (k, &row) in shown.iter().enumerate() {
                    if k > 0 {
                        write!(f, ",\n ")?;
                    }
                    if k == EDGE_ROWS && rows > 2 * EDGE_ROWS {
                        write!(f, "...（省略 {} 行）,\n ", rows - 2 * EDGE_ROWS)?;
                    }
                    write_row(f, &values[row * cols..(row + 1) * cols])?;
                }
                write!(f, "]")?;
            }
            _ => {
                return writeln!(f, "<阶数大于二的张量（形状：{shape:?}）不展示具体数据>");
            }
        }
        writeln!(f, "\n形状: {shape:?}")
    }
}
