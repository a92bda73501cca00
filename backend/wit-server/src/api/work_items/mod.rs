pub mod create_work_item_request;
pub mod update_work_item_request;
pub mod work_item_dto;
pub mod work_items;
