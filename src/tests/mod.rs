mod command;
mod config;
mod registers;
