mod common;
mod requirements;
mod service;
mod validation;
