mod common;
mod directory;
mod domain;
