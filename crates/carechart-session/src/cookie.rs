//! Session cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::token::SESSION_TTL_SECS;

/// Cookie name carrying the session token.
pub const SESSION_COOKIE: &str = "carechart_session";

fn base_cookie(value: String, domain: Option<String>, max_age: Duration) -> Cookie<'static> {
    let mut builder = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax);
    if let Some(domain) = domain {
        builder = builder.domain(domain);
    }
    builder.build()
}

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use carechart_session::cookie::{set_session_cookie, SESSION_COOKIE};
///
/// let jar = set_session_cookie(CookieJar::new(), "token".to_string(), Some("example.com".to_string()));
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(28800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, domain: Option<String>) -> CookieJar {
    jar.add(base_cookie(
        value,
        domain,
        Duration::seconds(SESSION_TTL_SECS as i64),
    ))
}

/// Clear the session cookie by overwriting it with an empty value and Max-Age 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use carechart_session::cookie::{clear_session_cookie, SESSION_COOKIE};
///
/// let jar = clear_session_cookie(CookieJar::new(), None);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(cookie.domain(), None);
/// ```
pub fn clear_session_cookie(jar: CookieJar, domain: Option<String>) -> CookieJar {
    jar.add(base_cookie(String::new(), domain, Duration::ZERO))
}
