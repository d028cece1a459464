#[allow(non_snake_case)]
pub mod ERS;
#[allow(non_snake_case)]
pub mod Properties;
#[allow(non_snake_case)]
pub mod Reactor;
#[allow(non_snake_case)]
pub mod VLE;
pub mod constants;
pub mod conversion;
pub mod kinetics;
