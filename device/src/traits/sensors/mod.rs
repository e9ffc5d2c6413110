pub mod humidity;
