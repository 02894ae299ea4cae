pub mod export_csv;
