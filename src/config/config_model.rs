#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub billing: Billing,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

/// Invoicing defaults applied to every new order and issued document.
#[derive(Debug, Clone)]
pub struct Billing {
    pub currency: String,
    pub tax_rate_bp: Option<i32>,
    pub payment_grace_days: u32,
    pub issuer: Issuer,
}

/// Seller identity stamped onto every invoice.
#[derive(Debug, Clone)]
pub struct Issuer {
    pub name: String,
    pub street: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
    pub tax_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AdminSecret {
    pub secret: String,
}
