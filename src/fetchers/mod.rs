pub mod hot_list;

pub use hot_list::HotListFetcher;
