pub mod celebrity;
pub mod maps;
pub mod movie;
pub mod ocr;
pub mod roleplay;
