pub mod worker_controller;

pub use worker_controller::WorkerController;
