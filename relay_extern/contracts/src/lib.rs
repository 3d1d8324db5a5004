pub mod test_account;
