pub mod iteration;
pub mod space;
pub mod work_item;
