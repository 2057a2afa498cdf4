#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub mobile: String,
    pub email: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CustomerField {
    Name,
    Mobile,
    Email,
}

impl Customer {
    pub fn field_mut(&mut self, field: CustomerField) -> &mut String {
        match field {
            CustomerField::Name => &mut self.name,
            CustomerField::Mobile => &mut self.mobile,
            CustomerField::Email => &mut self.email,
        }
    }

    /// All three fields are required before invoicing can begin.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.mobile.trim().is_empty()
            && !self.email.trim().is_empty()
    }
}
