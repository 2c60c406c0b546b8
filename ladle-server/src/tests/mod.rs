mod helpers;

mod category_api;
mod tag_api;
