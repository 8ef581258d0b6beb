use crate::{
    data::{Envelope, LoginData, User},
    error::Error,
};
use formpost::{
    form, indicator, Client, ClientConfiguration, HttpClient, LoadingIndicator, RequestConfig,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};
use tracing::{debug, info, warn};

const DEFAULT_DOMAIN_NAME: &str = "http://127.0.0.1:8000";

const VERIFY_PATH: &str = "/api/user/verify";
const LOGIN_PATH: &str = "/api/user/login";
const SHOW_PROFILE_PATH: &str = "/api/user/profile/show";
const UPDATE_PROFILE_PATH: &str = "/api/user/profile/update";

lazy_static! {
    static ref PHONE_REGEX: Regex = Regex::new(r"^1[0-9]{10}$").unwrap();
}

/// Builder used to build a UserApiClient instance
#[derive(Debug, Default)]
pub struct UserApiClientBuilder {
    domain_name: Option<String>,
    configuration: Option<ClientConfiguration>,
    http_client: Option<Arc<dyn HttpClient + Send + Sync>>,
    indicator: Option<Arc<dyn LoadingIndicator>>,
}

impl UserApiClientBuilder {
    /// Create a new UserApiClientBuilder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given domain_name when building a UserApiClient instance. It
    /// takes precedence over the base url of a configuration.
    pub fn with_domain_name<T: Into<String>>(mut self, domain_name: T) -> Self {
        self.domain_name = Some(domain_name.into());
        self
    }

    /// Start from a loaded client configuration instead of the defaults.
    pub fn with_configuration(mut self, configuration: ClientConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Send requests through the given transport.
    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient + Send + Sync>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Show progress on the given indicator instead of the process-wide one.
    pub fn with_indicator(mut self, indicator: Arc<dyn LoadingIndicator>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Consume the builder and create a UserApiClient instance using all of the previously configured values or
    /// their defaults.
    ///
    /// # Returns
    /// A UserApiClient instance, or an error if the domain name is not an http(s) address.
    pub fn build(self) -> Result<UserApiClient, Error> {
        let mut configuration = self.configuration.unwrap_or_default();
        match self.domain_name {
            Some(domain_name) => configuration.set_base_url(domain_name)?,
            None if configuration.base_url().is_none() => {
                configuration.set_base_url(DEFAULT_DOMAIN_NAME)?
            }
            None => {}
        }

        let indicator = self
            .indicator
            .unwrap_or_else(|| indicator::global() as Arc<dyn LoadingIndicator>);

        let mut client = Client::new(configuration);
        if let Some(http_client) = self.http_client {
            client.set_http_client(http_client);
        }
        let form_indicator = indicator.clone();
        client.add_interceptors(move |interceptors| interceptors.form_urlencoded(form_indicator));

        Ok(UserApiClient {
            client,
            indicator,
            cookies: Mutex::new(BTreeMap::new()),
        })
    }
}

/// Client for the user endpoints of the dating backend. Every request is sent
/// as a form. Cookies set by the backend, the login session among them, are
/// sent back on later calls.
#[derive(Debug)]
pub struct UserApiClient {
    client: Client,
    indicator: Arc<dyn LoadingIndicator>,
    cookies: Mutex<BTreeMap<String, String>>,
}

impl UserApiClient {
    /// Create a UserApiClient talking to the default domain.
    pub fn new() -> Result<Self, Error> {
        UserApiClientBuilder::new().build()
    }

    /// Asks the backend to text a login code to `phone`.
    ///
    /// # Arguments
    /// `phone` - an 11 digit mobile number starting with 1.
    pub async fn verify_phone<T: AsRef<str>>(&self, phone: T) -> Result<(), Error> {
        let phone = phone.as_ref();
        Self::check_phone(phone)?;

        let query = form::to_string(&json!({ "phone": phone }))?;
        self.call(RequestConfig::new("get", format!("{}?{}", VERIFY_PATH, query)))
            .await?;

        info!(phone, "login code requested");
        Ok(())
    }

    /// Logs in with the code sent by [`verify_phone`](Self::verify_phone).
    ///
    /// # Returns
    /// The logged in user.
    pub async fn login<T1: AsRef<str>, T2: AsRef<str>>(
        &self,
        phone: T1,
        code: T2,
    ) -> Result<User, Error> {
        let data = self
            .call(
                RequestConfig::new("post", LOGIN_PATH)
                    .with_data(json!({ "phone": phone.as_ref(), "code": code.as_ref() })),
            )
            .await?;
        let login: LoginData = serde_json::from_value(data)?;

        info!(user_id = login.user.id, "logged in");
        Ok(login.user)
    }

    pub async fn show_profile(&self) -> Result<Value, Error> {
        self.call(RequestConfig::new("get", SHOW_PROFILE_PATH)).await
    }

    /// Updates the profile fields present in `fields`.
    pub async fn update_profile<T: Serialize>(&self, fields: &T) -> Result<(), Error> {
        let fields = serde_json::to_value(fields)?;
        self.call(RequestConfig::new("post", UPDATE_PROFILE_PATH).with_data(fields))
            .await?;
        Ok(())
    }

    async fn call(&self, config: RequestConfig) -> Result<Value, Error> {
        debug!(method = %config.method, url = %config.url, "calling user api");
        let config = self.with_cookies(config);

        self.indicator.open();
        let result = self.client.request(config).await;
        match &result {
            // the form interceptor's error hook has closed it already
            Err(error) if error.is_request_phase() => {}
            _ => self.indicator.close(),
        }

        let response = result?;
        self.store_cookies(&response.cookies);
        if !response.is_success() {
            return Err(Error::HttpStatus(response.status_code));
        }

        let envelope: Envelope = serde_json::from_str(&response.body)?;
        match envelope.code {
            0 => Ok(envelope.data),
            code => Err(Error::Api { code }),
        }
    }

    fn with_cookies(&self, config: RequestConfig) -> RequestConfig {
        let cookies = match self.cookies.lock() {
            Ok(cookies) if !cookies.is_empty() => cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
            _ => return config,
        };

        config.with_header("Cookie", cookies)
    }

    fn store_cookies(&self, set_cookies: &[String]) {
        let mut cookies = match self.cookies.lock() {
            Ok(cookies) => cookies,
            Err(e) => {
                warn!("Cookie jar is poisoned: {}", e);
                return;
            }
        };

        for set_cookie in set_cookies {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                cookies.insert(name.trim().to_string(), value.trim().to_string());
            }
        }
    }

    fn check_phone(phone: &str) -> Result<(), Error> {
        if PHONE_REGEX.is_match(phone) {
            Ok(())
        } else {
            Err(Error::InvalidPhone(phone.into()))
        }
    }
}
