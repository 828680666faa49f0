pub mod assistant_handler;
