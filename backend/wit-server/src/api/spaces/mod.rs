pub mod create_space_request;
pub mod space_dto;
pub mod spaces;
pub mod update_space_request;
