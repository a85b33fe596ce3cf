use log::info;
use std::rc::Rc;

use crate::error::{DashboardError, Result};
use crate::models::Contact;
use crate::storage::TenantStore;

pub const CONTACT_THANKS: &str = "Thank you! We will contact you soon.";
pub const CONTACT_EMAIL_REQUIRED: &str = "Email cannot be empty.";

/// Lead capture from the public home page
#[derive(Clone)]
pub struct ContactService {
    store: Rc<dyn TenantStore>,
}

impl ContactService {
    pub fn new(store: Rc<dyn TenantStore>) -> Self {
        Self { store }
    }

    pub async fn submit(&self, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DashboardError::validation(CONTACT_EMAIL_REQUIRED));
        }

        self.store
            .insert_contact(&Contact {
                email: email.to_string(),
            })
            .await?;
        info!("Stored contact request");
        Ok(())
    }
}
