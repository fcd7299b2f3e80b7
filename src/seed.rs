//! Sample Portland scenario for demos and smoke tests.
//!
//! Coordinates are real Portland-area locations.

use crate::model::{
    OptimizeRequest, Priority, Ride, ServiceType, Vehicle, VehicleStatus, VehicleType,
};

struct Place {
    label: &'static str,
    lat: f64,
    lng: f64,
}

const PDX_AIRPORT: Place = Place { label: "PDX Airport", lat: 45.5898, lng: -122.5951 };
const PEARL_DISTRICT: Place = Place { label: "Pearl District", lat: 45.5287, lng: -122.6819 };
const PIONEER_SQUARE: Place = Place { label: "Pioneer Courthouse Square", lat: 45.5189, lng: -122.6793 };
const OHSU: Place = Place { label: "OHSU", lat: 45.4993, lng: -122.6856 };
const LLOYD_CENTER: Place = Place { label: "Lloyd Center", lat: 45.5317, lng: -122.6544 };
const HAWTHORNE: Place = Place { label: "Hawthorne District", lat: 45.5120, lng: -122.6258 };
const ALBERTA_ARTS: Place = Place { label: "Alberta Arts District", lat: 45.5590, lng: -122.6450 };
const SELLWOOD: Place = Place { label: "Sellwood", lat: 45.4650, lng: -122.6530 };
const BEAVERTON: Place = Place { label: "Beaverton Transit Center", lat: 45.4913, lng: -122.8017 };
const UNION_STATION: Place = Place { label: "Union Station", lat: 45.5290, lng: -122.6765 };
const MODA_CENTER: Place = Place { label: "Moda Center", lat: 45.5316, lng: -122.6668 };
const MULTNOMAH_VILLAGE: Place = Place { label: "Multnomah Village", lat: 45.4660, lng: -122.7150 };

#[allow(clippy::too_many_arguments)]
fn ride(
    id: &str,
    from: Place,
    to: Place,
    window: (&str, &str),
    passengers: u32,
    luggage: u32,
    priority: Priority,
    service_type: ServiceType,
    notes: &str,
) -> Ride {
    Ride {
        id: id.to_string(),
        pickup_lat: from.lat,
        pickup_lng: from.lng,
        dropoff_lat: to.lat,
        dropoff_lng: to.lng,
        time_window_start: window.0.to_string(),
        time_window_end: window.1.to_string(),
        passenger_count: passengers,
        priority,
        pickup_label: from.label.to_string(),
        dropoff_label: to.label.to_string(),
        service_type,
        luggage_count: luggage,
        notes: notes.to_string(),
    }
}

pub fn rides() -> Vec<Ride> {
    use Priority::*;
    use ServiceType::*;

    vec![
        ride("R001", PEARL_DISTRICT, PDX_AIRPORT, ("2026-02-28T06:30:00", "2026-02-28T06:45:00"), 2, 3, Urgent, AirportDeparture, "Flight departs 08:10"),
        ride("R002", PDX_AIRPORT, PIONEER_SQUARE, ("2026-02-28T07:15:00", "2026-02-28T07:45:00"), 1, 2, High, AirportArrival, "Meet at baggage claim 4"),
        ride("R003", HAWTHORNE, OHSU, ("2026-02-28T07:30:00", "2026-02-28T08:00:00"), 1, 0, High, Transfer, "Medical appointment"),
        ride("R004", ALBERTA_ARTS, LLOYD_CENTER, ("2026-02-28T08:00:00", "2026-02-28T08:30:00"), 3, 0, Medium, PointToPoint, ""),
        ride("R005", SELLWOOD, UNION_STATION, ("2026-02-28T08:15:00", "2026-02-28T08:45:00"), 2, 2, Medium, Transfer, "Train at 09:20"),
        ride("R006", BEAVERTON, PEARL_DISTRICT, ("2026-02-28T09:00:00", "2026-02-28T09:30:00"), 5, 1, Low, Transfer, "Corporate group"),
        ride("R007", MODA_CENTER, PDX_AIRPORT, ("2026-02-28T09:30:00", "2026-02-28T10:00:00"), 4, 6, Urgent, AirportDeparture, "Team equipment bags"),
        ride("R008", MULTNOMAH_VILLAGE, PIONEER_SQUARE, ("2026-02-28T10:00:00", "2026-02-28T13:00:00"), 2, 0, Low, Hourly, "Shopping, driver waits"),
        ride("R009", UNION_STATION, HAWTHORNE, ("2026-02-28T10:15:00", "2026-02-28T10:45:00"), 1, 1, Medium, PointToPoint, ""),
        ride("R010", OHSU, BEAVERTON, ("2026-02-28T11:00:00", "2026-02-28T11:30:00"), 1, 0, High, Transfer, "Wheelchair accessible"),
    ]
}

pub fn vehicles() -> Vec<Vehicle> {
    vec![
        vehicle("V001", "Town Car 1", PEARL_DISTRICT, 3, VehicleStatus::Available, VehicleType::Sedan, 3),
        vehicle("V002", "Suburban 1", LLOYD_CENTER, 6, VehicleStatus::Available, VehicleType::Suv, 6),
        vehicle("V003", "Transit Van", PDX_AIRPORT, 10, VehicleStatus::Available, VehicleType::Van, 12),
        vehicle("V004", "Sprinter", BEAVERTON, 14, VehicleStatus::OffDuty, VehicleType::Sprinter, 16),
    ]
}

fn vehicle(
    id: &str,
    name: &str,
    at: Place,
    capacity: u32,
    status: VehicleStatus,
    vehicle_type: VehicleType,
    luggage_capacity: u32,
) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        name: name.to_string(),
        current_lat: at.lat,
        current_lng: at.lng,
        capacity,
        status,
        vehicle_type,
        luggage_capacity,
    }
}

pub fn request() -> OptimizeRequest {
    OptimizeRequest {
        rides: rides(),
        vehicles: vehicles(),
    }
}
