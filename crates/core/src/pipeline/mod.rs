pub mod generate_timestamps_use_case;
