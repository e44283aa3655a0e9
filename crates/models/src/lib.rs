pub mod errors;
pub mod db;
pub mod question;

#[cfg(test)]
mod tests;
