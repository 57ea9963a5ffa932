pub mod inspection;
pub mod storage;
