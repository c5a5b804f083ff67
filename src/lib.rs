pub mod auth;
pub mod config;
pub mod db;
pub mod flash;
pub mod message;
pub mod middleware;
pub mod orm;
pub mod pagination;
pub mod session;
pub mod topic;
pub mod ugc;
pub mod web;
