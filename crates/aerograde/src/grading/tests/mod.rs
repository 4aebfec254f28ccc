mod attachments;
mod common;
mod constraints;
mod cost;
mod thrust;
