pub mod incrementer;
pub mod test_env;
