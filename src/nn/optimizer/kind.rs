/*
 * @Author       : 老董
 * @Date         : 2026-01-18
 * @Description  : 受支持优化器的白名单
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Adagrad, Adam, Adamax, AnyOptimizer, RMSProp, SGD};
use crate::train::TrainError;

/// 可选的优化器种类（白名单）。配置文件中以小写名称出现，如`"rmsprop"`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    #[default]
    Sgd,
    Adam,
    Adamax,
    RmsProp,
    Adagrad,
}

impl OptimizerKind {
    /// 全部受支持的优化器，按对比实验的顺序排列
    pub const ALL: [Self; 5] = [
        Self::Sgd,
        Self::Adam,
        Self::Adamax,
        Self::RmsProp,
        Self::Adagrad,
    ];

    /// 小写名称，与`FromStr`接受的写法一致
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sgd => "sgd",
            Self::Adam => "adam",
            Self::Adamax => "adamax",
            Self::RmsProp => "rmsprop",
            Self::Adagrad => "adagrad",
        }
    }

    /// 以默认超参数构建对应的优化器
    pub fn build(&self, learning_rate: f32) -> AnyOptimizer {
        match self {
            Self::Sgd => SGD::new(learning_rate).into(),
            Self::Adam => Adam::new_default(learning_rate).into(),
            Self::Adamax => Adamax::new_default(learning_rate).into(),
            Self::RmsProp => RMSProp::new_default(learning_rate).into(),
            Self::Adagrad => Adagrad::new_default(learning_rate).into(),
        }
    }

    pub(crate) fn allowed_names() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OptimizerKind {
    type Err = TrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| TrainError::UnsupportedOptimizer {
                name: s.to_string(),
                allowed: Self::allowed_names(),
            })
    }
}
