pub mod deploy;
pub mod site_checks;
pub mod staging;
