// src/services/mod.rs

pub mod quiz;

pub use quiz::QuizService;
