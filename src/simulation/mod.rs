pub mod random_network;
