pub mod assistant_service;
pub mod context_assembler;
pub mod ingestion_service;
pub mod model_service;
pub mod quiz_parser;
