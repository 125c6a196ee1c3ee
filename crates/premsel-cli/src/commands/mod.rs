pub mod evaluate;
pub mod extract;
pub mod generate;
pub mod init;
pub mod inspect;
pub mod parse;
pub mod prove;
pub mod select;
