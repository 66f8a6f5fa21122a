pub mod dirble_api;
