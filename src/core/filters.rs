use crate::models::{GenderIdentity, GenderPreference};

/// Check whether a gender preference admits a candidate's identity
///
/// `Men` and `Women` restrict to a single identity; `Bisexual` admits anyone.
#[inline]
pub fn accepts_identity(preference: GenderPreference, identity: GenderIdentity) -> bool {
    match preference {
        GenderPreference::Men => identity == GenderIdentity::Male,
        GenderPreference::Women => identity == GenderIdentity::Female,
        GenderPreference::Bisexual => true,
    }
}

/// Check that both participants accept each other's identity
#[inline]
pub fn mutually_compatible(
    a_identity: GenderIdentity,
    a_preference: GenderPreference,
    b_identity: GenderIdentity,
    b_preference: GenderPreference,
) -> bool {
    accepts_identity(a_preference, b_identity) && accepts_identity(b_preference, a_identity)
}
