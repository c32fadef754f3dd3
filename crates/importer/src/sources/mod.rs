pub mod football_data;
