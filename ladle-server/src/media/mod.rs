pub mod image_handlers;
