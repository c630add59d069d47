//! geodesic primitives shared by the graph builder and the turn-aware
//! traversal. mirrors the reference pipeline's manual math rather than a
//! full projection library, since every quantity needed here (great-circle
//! distance, initial bearing, signed turn angle) is a closed-form formula.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// great-circle distance between two lat/lon points, in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// initial forward bearing from (lat1, lon1) to (lat2, lon2), degrees
/// clockwise from true north, normalized to [0, 360).
pub fn bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    let theta = y.atan2(x).to_degrees();
    (theta + 360.0) % 360.0
}

/// signed turn angle between an incoming and outgoing bearing, in
/// (-180, 180]. positive is a right turn, negative is a left turn.
pub fn turn_angle(bearing_in: f64, bearing_out: f64) -> f64 {
    let raw = (bearing_out - bearing_in + 180.0).rem_euclid(360.0) - 180.0;
    if raw == -180.0 {
        180.0
    } else {
        raw
    }
}

/// cost of a turn given its signed angle. the straight-ahead band is
/// checked before the wider turn bands so that angles that fall inside it
/// (e.g. a nominal "right turn" of 5 degrees) are priced as straight, not
/// as a shallow right.
pub fn turn_cost(angle_deg: f64) -> f64 {
    if (-10.0..=10.0).contains(&angle_deg) {
        1.0
    } else if (0.0..=90.0).contains(&angle_deg) {
        0.5 + angle_deg / 180.0
    } else if (-90.0..0.0).contains(&angle_deg) {
        2.0 + angle_deg.abs() / 90.0
    } else {
        3.0 + angle_deg.abs() / 180.0
    }
}
