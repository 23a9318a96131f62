//! data 模块单元测试
