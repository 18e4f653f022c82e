pub mod shared_sink;
