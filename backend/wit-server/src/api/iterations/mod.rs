pub mod create_iteration_request;
pub mod iteration_dto;
pub mod iterations;
