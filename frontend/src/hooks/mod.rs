pub mod use_records;
