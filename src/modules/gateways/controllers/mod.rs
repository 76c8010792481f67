pub mod gateway_controller;
pub mod webhook_controller;

use actix_web::web;

/// Configure gateway and webhook routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    gateway_controller::configure(cfg);
    webhook_controller::configure(cfg);
}
