// Business domains
pub mod meetups;
