pub const DONATION_KEY_PREFIX: &str = "donation";

pub fn donation_key(session_id: &str) -> String {
	format!("{DONATION_KEY_PREFIX}:{session_id}")
}
