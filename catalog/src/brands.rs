//! Brand table.

use crate::types::Brand;

/// All selectable brands, in display order.
pub static BRANDS: &[Brand] = &[
    // German manufacturers and the VW group
    Brand {
        id: "mercedes",
        name: "Mercedes-Benz",
        models: &[
            "A-Class (W176)", "A-Class (W177)", "A180 CDI", "A200 AMG", "A45 AMG",
            "B-Class (W246)", "B-Class (W247)",
            "C-Class (W203)", "C-Class (W204)", "C-Class (W205)", "C-Class (W206)",
            "C180 Kompressor", "C200d Bluetec", "C63 AMG",
            "E-Class (W211)", "E-Class (W212)", "E-Class (W213)",
            "E180", "E250 CDI", "E300", "E63 AMG",
            "S-Class (W221)", "S-Class (W222)", "S-Class (W223)",
            "S320 CDI", "S350 BlueTec", "S400 Hybrid", "S500 (V8)", "S600 (V12)", "S63 AMG",
            "Maybach S-Class", "Maybach S580", "Maybach S680", "Maybach GLS 600",
            "CLA (C117)", "CLA (C118)",
            "CLS (C218)", "CLS (C257)",
            "GLA", "GLB", "GLC", "GLE", "GLS", "G-Class (W463)",
            "Vito (W639)", "Vito (W447)", "Sprinter", "Citan", "X-Class",
        ],
    },
    Brand {
        id: "bmw",
        name: "BMW",
        models: &[
            "1 Serisi (E87)", "1 Serisi (F20)", "1 Serisi (F40)",
            "3 Serisi (E36)", "3 Serisi (E46)", "3 Serisi (E90)", "3 Serisi (F30)", "3 Serisi (G20)",
            "316i", "318i", "320i ED", "320d", "M3",
            "4 Serisi (F32)", "4 Serisi (G22)", "4 Serisi Gran Coupe",
            "5 Serisi (E39)", "5 Serisi (E60)", "5 Serisi (F10)", "5 Serisi (G30)", "5 Serisi (G60)",
            "520d", "520i", "525xd", "530i", "M5",
            "7 Serisi (E65)", "7 Serisi (F01)", "7 Serisi (G11)", "7 Serisi (G70)",
            "X1 (E84)", "X1 (F48)",
            "X3 (F25)", "X3 (G01)",
            "X5 (E53)", "X5 (E70)", "X5 (F15)", "X5 (G05)",
            "X6", "iX",
        ],
    },
    Brand {
        id: "audi",
        name: "Audi",
        models: &[
            "A3 (8P)", "A3 (8V)", "A3 (8Y)", "S3",
            "A4 (B6)", "A4 (B7)", "A4 (B8)", "A4 (B9)",
            "A5 (8T)", "A5 (F5)",
            "A6 (C6)", "A6 (C7)", "A6 (C8)",
            "A7 Sportback",
            "A8 (D3)", "A8 (D4)", "A8 (D5)",
            "Q2", "Q3", "Q5", "Q7", "Q8",
            "TT", "e-tron",
        ],
    },
    Brand {
        id: "vw",
        name: "Volkswagen",
        models: &[
            "Golf 4 (IV)", "Golf 5 (V)", "Golf 6 (VI)", "Golf 7 (VII)", "Golf 7.5", "Golf 8 (VIII)", "Golf GTI", "Golf R",
            "Passat B5", "Passat B5.5", "Passat B6", "Passat B7", "Passat B8", "Passat Variant", "Passat CC",
            "Polo (6N)", "Polo (9N)", "Polo (6R)", "Polo (AW)",
            "Bora", "Jetta MK5", "Jetta MK6",
            "Caddy MK3", "Caddy MK4", "Caddy MK5",
            "Transporter T4", "Transporter T5", "Transporter T6", "Caravelle",
            "Tiguan MK1", "Tiguan MK2", "Touareg", "Amarok", "Arteon", "Scirocco", "T-Roc",
        ],
    },
    Brand {
        id: "opel",
        name: "Opel",
        models: &[
            "Vectra A (1988-1995)", "Vectra A GT",
            "Vectra B (1995-2002)", "Vectra B 2.0 CDX", "Vectra B 2.5 V6", "Vectra B 1.6 Comfort",
            "Vectra C (2002-2008)", "Vectra C 1.9 CDTI", "Vectra C OPC",
            "Astra F", "Astra F GSI",
            "Astra G (1998-2004)", "Astra G 1.6 16V", "Astra G Bertone",
            "Astra H (2004-2009)", "Astra H 1.3 CDTI", "Astra H GTC",
            "Astra J (2009-2015)", "Astra J 1.4 Turbo", "Astra J 1.6 CDTI",
            "Astra K (2015-2021)", "Astra L (2021-Present)",
            "Corsa B (1993-2000)", "Corsa B GSI",
            "Corsa C (2000-2006)", "Corsa C 1.7 DTI", "Corsa C 1.3 CDTI",
            "Corsa D (2006-2014)", "Corsa D OPC",
            "Corsa E (2014-2019)",
            "Corsa F (2019-Present)", "Corsa-e",
            "Insignia A (2008-2017)", "Insignia A 2.0 Turbo 4x4", "Insignia OPC",
            "Insignia B (2017-2022)", "Insignia B GSI",
            "Omega B", "Omega B 2.5 V6", "Omega B 3.0 MV6",
            "Tigra A", "Tigra B TwinTop",
            "Mokka", "Mokka X", "Mokka-e",
            "Crossland", "Crossland X",
            "Grandland X", "Grandland",
            "Zafira A", "Zafira B", "Zafira C Tourer",
            "Meriva A", "Meriva B",
            "Adam", "Karl",
            "Combo C", "Combo D", "Combo E",
            "Vivaro A", "Vivaro B", "Vivaro C",
            "Movano",
        ],
    },
    Brand {
        id: "porsche",
        name: "Porsche",
        models: &[
            "911 (997)", "911 (991)", "911 (992)",
            "Cayenne (955)", "Cayenne (958)", "Cayenne (E3)",
            "Macan", "Panamera (970)", "Panamera (971)",
            "Taycan", "718 Cayman/Boxster",
        ],
    },
    // French manufacturers
    Brand {
        id: "renault",
        name: "Renault",
        models: &[
            "Clio 2", "Clio 3", "Clio 4", "Clio 5", "Clio Symbol",
            "Megane 1", "Megane 2", "Megane 3", "Megane 4",
            "Fluence", "Symbol", "Taliant",
            "Laguna 1", "Laguna 2", "Laguna 3", "Talisman",
            "Captur", "Kadjar", "Austral", "Koleos",
            "Kangoo 1", "Kangoo 2", "Kangoo 3",
            "Traffic", "Master", "Broadway (R9)", "R19 Europa",
        ],
    },
    Brand {
        id: "peugeot",
        name: "Peugeot",
        models: &[
            "106", "106 GTI", "106 Quiksilver",
            "107", "108",
            "206", "206+", "206 GTI", "206 RC", "206 CC", "206 Sedan",
            "207", "207 GT", "207 RC", "207 CC", "207 Outdoor",
            "208 Mk1 (2012-2019)", "208 Mk2 (2019-Present)", "e-208", "208 GTI",
            "301",
            "306", "306 GTI-6", "306 Cabriolet",
            "307", "307 SW", "307 CC",
            "308 Mk1 (T7)", "308 Mk2 (T9)", "308 Mk3 (P5)", "308 GT", "308 GTI",
            "406", "406 Coupe (Pininfarina)", "406 2.0 HDi",
            "407", "407 Coupe", "407 SW",
            "408 (Crossover Coupe)",
            "508 Mk1 (2010-2018)", "508 Mk2 (2018-Present)", "508 SW", "508 PSE (Sport Engineered)",
            "5008 Mk1 (MPV)", "5008 Mk2 (SUV)",
            "2008 Mk1", "2008 Mk2", "e-2008",
            "3008 Mk1", "3008 Mk2", "3008 Mk3", "3008 Hybrid4",
            "RCZ", "RCZ R",
            "Partner (M49)", "Partner (M59)", "Partner Tepee (B9)", "Rifter (K9)",
            "Bipper", "Expert", "Boxer", "Traveller",
        ],
    },
    Brand {
        id: "citroen",
        name: "Citroën",
        models: &[
            "C3", "C3 Aircross", "C4", "C4 Picasso", "C4 X", "C5", "C5 Aircross",
            "C-Elysee", "Berlingo", "Nemo", "Saxo", "Xsara",
        ],
    },
    // Italian manufacturers
    Brand {
        id: "fiat",
        name: "Fiat",
        models: &[
            "Egea Sedan", "Egea Cross", "Egea HB",
            "Linea", "Albea", "Palio", "Siena",
            "Punto", "Grande Punto", "Punto Evo",
            "Doblo 1", "Doblo 2", "Doblo 3", "Doblo 4",
            "Fiorino", "Ducato",
            "500", "500X", "500L",
            "Bravo", "Stilo", "Marea", "Tempra", "Tipo (Eski)", "Uno", "Şahin/Doğan (Tofaş)",
        ],
    },
    Brand {
        id: "alfa",
        name: "Alfa Romeo",
        models: &[
            "Giulietta", "Giulia", "Stelvio", "Tonale", "159", "156", "147", "GT", "Mito",
        ],
    },
    // Japanese and Korean manufacturers
    Brand {
        id: "toyota",
        name: "Toyota",
        models: &[
            "Corolla (AE101 - Efsane)", "Corolla (Terra/Sol)", "Corolla (E120)", "Corolla (E140/E150)",
            "Corolla (E160)", "Corolla (E210 - Hybrid)",
            "Yaris", "Auris", "Avensis", "Camry", "C-HR", "RAV4", "Hilux", "Proace",
        ],
    },
    Brand {
        id: "honda",
        name: "Honda",
        models: &[
            "Civic (EG)", "Civic (EK - 1.4/1.6ies)", "Civic (ES7 - VTEC)", "Civic (FD6)", "Civic (FB7)",
            "Civic (FC5)", "Civic (FE1)",
            "City", "Jazz", "CR-V", "HR-V", "Accord",
        ],
    },
    Brand {
        id: "hyundai",
        name: "Hyundai",
        models: &[
            "Accent (Yumurta)", "Accent (Milenyum)", "Accent Admire", "Accent Era", "Accent Blue",
            "i10", "i20", "i30", "Elantra", "Tucson", "Bayon", "Kona", "Getz", "Starex",
        ],
    },
    Brand {
        id: "nissan",
        name: "Nissan",
        models: &[
            "Qashqai (J10)", "Qashqai (J11)", "Qashqai (J12)", "Juke", "X-Trail", "Micra", "Navara",
            "Primera", "Almera",
        ],
    },
    // American and others
    Brand {
        id: "ford",
        name: "Ford",
        models: &[
            "Focus 1", "Focus 2", "Focus 2.5", "Focus 3", "Focus 3.5", "Focus 4",
            "Fiesta", "Mondeo", "Fusion",
            "Courier", "Connect", "Custom", "Transit",
            "Kuga", "Puma", "Ranger", "Escort", "Taunus",
        ],
    },
    Brand {
        id: "skoda",
        name: "Skoda",
        models: &[
            "Octavia A4", "Octavia A5", "Octavia A7", "Octavia A8", "Superb", "Fabia", "Kamiq", "Karoq",
            "Kodiaq", "Scala", "Rapid",
        ],
    },
    Brand {
        id: "seat",
        name: "Seat",
        models: &[
            "Leon MK2", "Leon MK3", "Leon MK4", "Ibiza", "Toledo", "Ateca", "Arona", "Altea",
        ],
    },
    Brand {
        id: "dacia",
        name: "Dacia",
        models: &[
            "Duster", "Sandero", "Sandero Stepway", "Lodgy", "Dokker", "Logan", "Jogger",
        ],
    },
    Brand {
        id: "togg",
        name: "Togg",
        models: &["T10X V1", "T10X V2 Long Range"],
    },
];

/// Find a brand by its display name.
pub fn brand_by_name(name: &str) -> Option<&'static Brand> {
    BRANDS.iter().find(|b| b.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_brand_ids_unique() {
        let ids: HashSet<_> = BRANDS.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), BRANDS.len());
        assert_eq!(BRANDS.len(), 20);
    }

    #[test]
    fn test_brand_lookup() {
        let vw = brand_by_name("Volkswagen").unwrap();
        assert_eq!(vw.id, "vw");
        assert!(vw.has_model("Golf 7 (VII)"));
        assert!(brand_by_name("volkswagen").is_none());
    }

    #[test]
    fn test_every_brand_has_models() {
        assert!(BRANDS.iter().all(|b| !b.models.is_empty()));
    }
}
