use crate::error::MensualizadosError;
use std::fmt;
use std::str::FromStr;

/// Organizational area a mensualizados file comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    AmbienteYEspacioPublico,
    Arsi,
    CapitalHumano,
    DesarrolloHumanoYDeportes,
    EducacionCulturaYTrabajo,
    General,
    Gobierno,
    Hcd,
    HaciendaYFinanzas,
    JefaturaDeGabinete,
    LegalYTecnica,
    PlaneamientoUrbano,
    Privada,
    SaludPublica,
    Seguridad,
}

impl Area {
    /// Every selectable area, in menu order
    pub const ALL: [Area; 15] = [
        Area::AmbienteYEspacioPublico,
        Area::Arsi,
        Area::CapitalHumano,
        Area::DesarrolloHumanoYDeportes,
        Area::EducacionCulturaYTrabajo,
        Area::General,
        Area::Gobierno,
        Area::Hcd,
        Area::HaciendaYFinanzas,
        Area::JefaturaDeGabinete,
        Area::LegalYTecnica,
        Area::PlaneamientoUrbano,
        Area::Privada,
        Area::SaludPublica,
        Area::Seguridad,
    ];

    /// Label shown to users and used in output file names
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Area::AmbienteYEspacioPublico => "AMBIENTE Y ESPACIO PUBLICO",
            Area::Arsi => "ARSI",
            Area::CapitalHumano => "CAPITAL HUMANO",
            Area::DesarrolloHumanoYDeportes => "DESARROLLO HUMANO Y DEPORTES",
            Area::EducacionCulturaYTrabajo => "EDUCACION, CULTURA Y TRABAJO",
            Area::General => "GENERAL",
            Area::Gobierno => "GOBIERNO",
            Area::Hcd => "H.C.D.",
            Area::HaciendaYFinanzas => "HACIENDA Y FINANZAS",
            Area::JefaturaDeGabinete => "JEFATURA DE GABINETE",
            Area::LegalYTecnica => "LEGAL Y TECNICA",
            Area::PlaneamientoUrbano => "PLANEAMIENTO URBANO",
            Area::Privada => "PRIVADA",
            Area::SaludPublica => "SALUD PUBLICA",
            Area::Seguridad => "SEGURIDAD",
        }
    }

    /// Whether files from this area are split into one file per office
    #[must_use]
    pub fn splits_by_office(self) -> bool {
        matches!(self, Area::SaludPublica | Area::AmbienteYEspacioPublico)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Area {
    type Err = MensualizadosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.is_empty() {
            return Err(MensualizadosError::NoAreaSelected);
        }
        Area::ALL
            .into_iter()
            .find(|area| area.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MensualizadosError::UnknownArea(wanted.to_string()))
    }
}
