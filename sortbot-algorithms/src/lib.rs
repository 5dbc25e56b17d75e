pub mod shelf_relay;
