pub mod iteration_repository;
pub mod space_repository;
pub mod work_item_repository;
