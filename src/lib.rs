// Crate entry point. Re-export modules so tests and binaries can import them
// easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.

pub mod core {
    pub mod entry;
    pub mod ports;
    pub mod roster;
    pub mod stats;
    pub mod summary;
    pub mod week;
}

pub mod application {
    pub mod aggregator;
    pub mod controller;
    pub mod errors;
    pub mod listener;
}

pub mod adapters {
    pub mod in_memory {
        pub mod in_memory_feed;
        pub mod in_memory_store;
    }
    pub mod inbound {
        pub mod graphql;
    }
}
