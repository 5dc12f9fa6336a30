//! The property listings shown on the results page.
//!
//! Results are a fixed showcase set, not a search. Every visitor sees the
//! same listings regardless of their answers.

use serde::Serialize;

/// How good a listing is relative to comparable spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DealScore {
    Great,
    Good,
    Fair,
}

impl DealScore {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Great => "Great Deal",
            Self::Good => "Good Deal",
            Self::Fair => "Fair Price",
        }
    }

    /// CSS modifier for the badge.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Fair => "fair",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: &'static str,
    pub title: &'static str,
    pub location: &'static str,
    /// Monthly asking rent in whole dollars.
    pub price: u32,
    pub size: u32,
    pub kind: &'static str,
    pub availability: &'static str,
    pub deal_score: DealScore,
    pub lat: f64,
    pub lng: f64,
    pub image_url: &'static str,
}

const SHOWCASE: &[Listing] = &[
    Listing {
        id: "lss-101",
        title: "Flex Warehouse with Roll-Up Door",
        location: "5600 Olde Wadsworth Blvd, Arvada, CO",
        price: 2850,
        size: 2400,
        kind: "Warehouse",
        availability: "Available Now",
        deal_score: DealScore::Great,
        lat: 39.7990,
        lng: -105.0810,
        image_url: "/static/img/listings/warehouse-arvada.jpg",
    },
    Listing {
        id: "lss-102",
        title: "Light Industrial Bay near I-70",
        location: "4800 Dahlia St, Denver, CO",
        price: 3400,
        size: 3200,
        kind: "Industrial",
        availability: "Available Now",
        deal_score: DealScore::Good,
        lat: 39.7810,
        lng: -104.9310,
        image_url: "/static/img/listings/industrial-denver.jpg",
    },
    Listing {
        id: "lss-103",
        title: "Contractor Shop with Yard",
        location: "12000 W 52nd Ave, Wheat Ridge, CO",
        price: 1950,
        size: 1500,
        kind: "Shop",
        availability: "30 Days",
        deal_score: DealScore::Great,
        lat: 39.7890,
        lng: -105.1190,
        image_url: "/static/img/listings/shop-wheat-ridge.jpg",
    },
    Listing {
        id: "lss-104",
        title: "Mixed-Use Storefront + Storage",
        location: "1000 Washington Ave, Golden, CO",
        price: 2600,
        size: 1800,
        kind: "Mixed-use",
        availability: "60 Days",
        deal_score: DealScore::Fair,
        lat: 39.7555,
        lng: -105.2211,
        image_url: "/static/img/listings/mixed-use-golden.jpg",
    },
    Listing {
        id: "lss-105",
        title: "Small Warehouse Suite",
        location: "7400 W Quarto Ave, Littleton, CO",
        price: 1650,
        size: 1100,
        kind: "Warehouse",
        availability: "Available Now",
        deal_score: DealScore::Good,
        lat: 39.6130,
        lng: -105.0790,
        image_url: "/static/img/listings/warehouse-littleton.jpg",
    },
    Listing {
        id: "lss-106",
        title: "Industrial Condo with Office",
        location: "3500 E 104th Ave, Thornton, CO",
        price: 4100,
        size: 4000,
        kind: "Industrial",
        availability: "90 Days",
        deal_score: DealScore::Fair,
        lat: 39.8870,
        lng: -104.9440,
        image_url: "/static/img/listings/industrial-thornton.jpg",
    },
];

/// The listings shown to every visitor.
#[must_use]
pub const fn showcase() -> &'static [Listing] {
    SHOWCASE
}
