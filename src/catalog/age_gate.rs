// Age-gate bypass cookies.
// The storefront accepts a stored birth date in place of the confirmation form.

/// 1980-01-01T00:00:01Z, comfortably past every minimum-age check.
pub(crate) const BIRTH_TIME: i64 = 315_532_801;
const LAST_AGE_CHECK: &str = "1-0-1980";

/// Build the `Cookie` header for a bypass request. The session id from the
/// interstitial response is echoed back when present.
pub(crate) fn bypass_cookie(session_id: Option<&str>) -> String {
    let mut cookies = vec![
        format!("birthtime={BIRTH_TIME}"),
        format!("lastagecheckage={LAST_AGE_CHECK}"),
        "wants_mature_content=1".to_string(),
        "mature_content=1".to_string(),
    ];
    if let Some(session_id) = session_id {
        cookies.push(format!("sessionid={session_id}"));
    }
    cookies.join("; ")
}
