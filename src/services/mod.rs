pub mod presign_service;
