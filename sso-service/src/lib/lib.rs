pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub mod proto {
    tonic::include_proto!("sso");
}
