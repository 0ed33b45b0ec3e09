//! In-process stand-ins for the GPS, reward and trip pricing services.

use std::time::Duration;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use tourguide_core::{
    Attraction, AttractionId, Coordinate, TourGuideResult, TripDeal, UserId, VisitedLocation,
};

use super::{LocationProvider, ScoreProvider, TripDealProvider, TripRequest};

/// Largest latitude a Web Mercator map can show.
pub const MAX_LATITUDE: f64 = 85.05112878;

const CATALOG: &[(&str, &str, &str, f64, f64)] = &[
    ("Disneyland", "Anaheim", "CA", 33.817595, -117.922008),
    ("Jackson Hole", "Jackson Hole", "WY", 43.582767, -110.821999),
    ("Mojave National Preserve", "Kelso", "CA", 35.141689, -115.510399),
    ("Joshua Tree National Park", "Joshua Tree National Park", "CA", 33.881866, -115.90065),
    ("Buffalo National River", "St Joe", "AR", 35.985512, -92.757652),
    ("Hot Springs National Park", "Hot Springs", "AR", 34.52153, -93.042267),
    ("Kartchner Caverns State Park", "Benson", "AZ", 31.837551, -110.347382),
    ("Legend Valley", "Thornville", "OH", 39.937778, -82.40667),
    ("Flowers Bakery of London", "Flowers Bakery of London", "KY", 37.131527, -84.07486),
    ("McKinley Tower", "Anchorage", "AK", 61.218887, -149.877502),
    ("Flatiron Building", "New York City", "NY", 40.741112, -73.989723),
    ("Fallingwater", "Mill Run", "PA", 39.906111, -79.468056),
    ("Union Station", "Washington D.C.", "CD", 38.897095, -77.006332),
    ("Roger Dean Stadium", "Jupiter", "FL", 26.890959, -80.116577),
    ("Texas Memorial Stadium", "Austin", "TX", 30.283682, -97.732536),
    ("Bryant-Denny Stadium", "Tuscaloosa", "AL", 33.208973, -87.550438),
    ("Tiger Stadium", "Baton Rouge", "LA", 30.412035, -91.183815),
    ("Neyland Stadium", "Knoxville", "TN", 35.955013, -83.925011),
    ("Kyle Field", "College Station", "TX", 30.6102, -96.340169),
    ("San Diego Zoo", "San Diego", "CA", 32.735317, -117.149048),
    ("Zoo Tampa at Lowry Park", "Tampa", "FL", 28.012804, -82.469269),
    ("Franklin Park Zoo", "Boston", "MA", 42.302601, -71.086731),
    ("El Paso Zoo", "El Paso", "TX", 31.769125, -106.444092),
    ("Kansas City Zoo", "Kansas City", "MO", 39.007504, -94.529625),
    ("Bronx Zoo", "Bronx", "NY", 40.852905, -73.872971),
    ("Cinderella Castle", "Orlando", "FL", 28.419411, -81.5812),
];

const TRIP_PROVIDERS: &[&str] = &[
    "Holiday Travels",
    "Enterprize Ventures Limited",
    "Sunny Days",
    "FlyAway Trips",
    "United Partners Vacations",
    "Dream Trips",
    "Live Free",
    "Dancing Waves Cruselines and Partners",
    "AdventureCo",
    "Cure-Your-Blues",
];

/// Number of offers returned by [`SimulatedTripPricer`].
pub const TRIP_DEAL_COUNT: usize = 5;

/// A uniformly random point on the map.
pub fn random_coordinate<R: Rng + ?Sized>(rng: &mut R) -> Coordinate {
    Coordinate::new(
        rng.gen_range(-MAX_LATITUDE..MAX_LATITUDE),
        rng.gen_range(-180.0..180.0),
    )
}

// ── GPS ───────────────────────────────────────────────────────

/// Fixed attraction catalog plus random position fixes.
pub struct SimulatedGps {
    attractions: Vec<Attraction>,
    latency: Duration,
}

impl SimulatedGps {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Every `current_location` call sleeps for `latency` first.
    pub fn with_latency(latency: Duration) -> Self {
        let attractions = CATALOG
            .iter()
            .map(|(name, city, state, lat, lon)| Attraction::new(name, city, state, *lat, *lon))
            .collect();
        Self {
            attractions,
            latency,
        }
    }
}

impl Default for SimulatedGps {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for SimulatedGps {
    fn attractions(&self) -> Vec<Attraction> {
        self.attractions.clone()
    }

    fn current_location(&self, user_id: UserId) -> TourGuideResult<VisitedLocation> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        let location = random_coordinate(&mut rand::thread_rng());
        Ok(VisitedLocation::new(user_id, location, Utc::now()))
    }
}

// ── Rewards ───────────────────────────────────────────────────

/// Scores every (attraction, user) pair with a stable value in 1..=1000.
#[derive(Default)]
pub struct SimulatedRewardCentral {
    latency: Duration,
}

impl SimulatedRewardCentral {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn points_for(attraction_id: AttractionId, user_id: UserId) -> u32 {
        let a = attraction_id.as_u128();
        let u = user_id.as_u128();
        let folded = (a ^ u.rotate_left(64)) as u64 ^ ((a >> 64) as u64).wrapping_add(u as u64);
        (splitmix64(folded) % 1000) as u32 + 1
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

impl ScoreProvider for SimulatedRewardCentral {
    fn attraction_reward_points(
        &self,
        attraction_id: AttractionId,
        user_id: UserId,
    ) -> TourGuideResult<u32> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        Ok(Self::points_for(attraction_id, user_id))
    }
}

// ── Trip pricing ──────────────────────────────────────────────

/// Quotes [`TRIP_DEAL_COUNT`] offers from distinct providers. Reward points
/// are deducted from each price.
#[derive(Default)]
pub struct SimulatedTripPricer;

impl SimulatedTripPricer {
    pub fn new() -> Self {
        Self
    }
}

impl TripDealProvider for SimulatedTripPricer {
    fn price(&self, request: &TripRequest<'_>) -> TourGuideResult<Vec<TripDeal>> {
        let mut rng = rand::thread_rng();
        let party = f64::from(request.adults) + f64::from(request.children) / 3.0;
        let nights = f64::from(request.nights.max(1));

        let deals = TRIP_PROVIDERS
            .choose_multiple(&mut rng, TRIP_DEAL_COUNT)
            .map(|name| {
                let nightly: f64 = rng.gen_range(100.0..700.0);
                let price = (nightly * party * nights + 0.99 - request.reward_points as f64).max(0.0);
                TripDeal {
                    trip_id: Uuid::new_v4(),
                    provider_name: (*name).to_string(),
                    price,
                }
            })
            .collect();
        Ok(deals)
    }
}
