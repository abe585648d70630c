pub mod accession_list;
pub mod accessor;
pub mod app;
pub mod assemble;
pub mod attributes;
pub mod config;
pub mod domain;
pub mod error;
pub mod organism;
pub mod output;
pub mod package;
pub mod pool;
pub mod publication;
pub mod records;
pub mod sqlite;
pub mod vocab;
pub mod xml;
