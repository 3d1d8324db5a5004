use relay_core_contact_impl::ContactServiceImpl;
use relay_email_impl::EmailServiceImpl;
use relay_extern_impl::test_account::TestAccountApiServiceImpl;
use relay_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = relay_api_rest::RestServer<Contact>;

// Email
pub type Email = EmailServiceImpl<TestAccountApi>;

// Extern
pub type TestAccountApi = TestAccountApiServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type Contact = ContactServiceImpl<Time, Email>;
