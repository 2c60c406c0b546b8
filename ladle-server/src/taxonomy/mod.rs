pub mod category_handlers;
pub mod tag_handlers;
