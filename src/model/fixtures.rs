// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in demo data for `--demo` runs and tests.

use super::ids::{SpotId, UserId};
use super::spot::{Spot, SpotKind};
use super::user::{GeoPoint, Role, User};

fn uid(value: &str) -> UserId {
    UserId::new(value).expect("user id")
}

fn sid(value: &str) -> SpotId {
    SpotId::new(value).expect("spot id")
}

pub fn demo_users() -> Vec<User> {
    let mut lea = User::new(uid("u:lea"), "Léa Fontaine");
    lea.set_roles(vec![Role::Model]);
    lea.set_headline("Modèle éditorial & beauté");
    lea.set_bio("Basée à Paris, disponible pour shootings mode et portraits.");
    lea.set_rate(80.0);
    lea.set_available_now(true);
    lea.set_location(GeoPoint {
        lat: 48.8738,
        lng: 2.2950,
    });

    let mut marc = User::new(uid("u:marc"), "Marc Delacroix");
    marc.set_roles(vec![Role::Photographer]);
    marc.set_headline("Photographe lifestyle & street");
    marc.set_bio("15 ans d'expérience. Argentique et numérique.");
    marc.set_rate(120.0);
    marc.set_available_now(false);
    marc.set_location(GeoPoint {
        lat: 48.8606,
        lng: 2.3376,
    });

    let mut noa = User::new(uid("u:noa"), "Noa Berger");
    noa.set_roles(vec![Role::Videographer, Role::Photographer]);
    noa.set_headline("Vidéaste clips & documentaires");
    noa.set_bio("Drone certifié, montage inclus.");
    noa.set_rate(150.0);
    noa.set_available_now(true);
    noa.set_location(GeoPoint {
        lat: 48.8529,
        lng: 2.3500,
    });

    vec![lea, marc, noa]
}

pub fn demo_spots() -> Vec<Spot> {
    let mut bir_hakeim = Spot::new(
        sid("s:bir-hakeim"),
        "Pont Bir-Hakeim",
        SpotKind::Outdoor,
        "Architecture",
        GeoPoint {
            lat: 48.8556,
            lng: 2.2876,
        },
    );
    bir_hakeim.set_description(
        "Iconique pour ses lignes de fuite et sa vue sur la Tour Eiffel. \
         Parfait pour le streetwear et la mode.",
    );

    let mut cremieux = Spot::new(
        sid("s:cremieux"),
        "Rue Crémieux",
        SpotKind::Outdoor,
        "Couleurs",
        GeoPoint {
            lat: 48.8469,
            lng: 2.3708,
        },
    );
    cremieux.set_description("Petite rue piétonne aux façades colorées. Ambiance pastel.");

    let mut buren = Spot::new(
        sid("s:buren"),
        "Colonnes de Buren",
        SpotKind::Outdoor,
        "Graphic",
        GeoPoint {
            lat: 48.8633,
            lng: 2.3370,
        },
    );
    buren.set_description("Palais-Royal. Contrastes noir et blanc, portraits graphiques.");

    let mut bnf = Spot::new(
        sid("s:bnf-ovale"),
        "BNF Richelieu - Salle Ovale",
        SpotKind::Indoor,
        "Library",
        GeoPoint {
            lat: 48.8679,
            lng: 2.3385,
        },
    );
    bnf.set_description("Somptueuse bibliothèque gratuite. Lumière zénithale incroyable.");

    vec![bir_hakeim, cremieux, buren, bnf]
}
