/*
 * @Author       : 老董
 * @Date         : 2026-01-18
 * @Description  : nn 模块单元测试
 */

mod criterion;
mod optimizer; // 优化器测试模块（各优化器的更新公式、白名单与通用行为）
