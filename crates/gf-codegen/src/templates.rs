//! C++ source templates.
//!
//! Placeholders are written `{{NAME}}` and filled by [`render`].

use crate::error::{CodegenError, CodegenResult};

pub const CONSTRUCTION_CC: &str = r#"
#include "construction.hh"

MyDetectorConstruction::MyDetectorConstruction()
{
    fMessenger = new G4GenericMessenger(this, "/detector/", "Detector Construction");

    fMessenger -> DeclareProperty("nCols", nCols, "Number of columns");
    fMessenger -> DeclareProperty("nRows", nRows, "Number of rows");

    nCols = 50;
    nRows = 50;

    DefineMaterials();
}

MyDetectorConstruction::~MyDetectorConstruction()
{}

void MyDetectorConstruction::DefineMaterials()
{
    G4NistManager *nist = G4NistManager::Instance();

    worldMat = nist -> FindOrBuildMaterial("{{WORLD_MATERIAL}}");

{{MATERIALS}}
}

G4VPhysicalVolume *MyDetectorConstruction::Construct()
{
    G4double xWorld = {{X_WORLD}};
    G4double yWorld = {{Y_WORLD}};
    G4double zWorld = {{Z_WORLD}};
    G4double xDet   = {{X_DET}};
    G4double yDet   = {{Y_DET}};
    G4double zDet   = {{Z_DET}};
    G4double zPVPd  = {{Z_PLACEMENT}};
    G4double zPMT   = 10.*mm;
    G4bool checkOverlaps = true;

    solidWorld = new G4Box("solidWorld", xWorld/2, yWorld/2, zWorld/2);
    logicWorld = new G4LogicalVolume(solidWorld, worldMat, "logicWorld");
    phys_World = new G4PVPlacement(0, G4ThreeVector(0., 0., 0.), logicWorld, "phys_World", 0, false, 0, checkOverlaps);

    solidDetector = new G4Box("solidDetector", xDet/2, yDet/2, zDet/2);
    logicDetector = new G4LogicalVolume(solidDetector, {{DETECTOR_MATERIAL}}, "logicDetector");
    phys_Detector = new G4PVPlacement(0, G4ThreeVector(0., 0., zPVPd), logicDetector, "phys_Detector", logicWorld, false, 0, checkOverlaps);
{{PMT_BLOCK}}
    fScoringVolume = logicDetector;

    return phys_World;
}

void MyDetectorConstruction::ConstructSDandField()
{
    MySensitiveDetector *sensDet = new MySensitiveDetector("SensitiveDetector");

    {{SENSITIVE_VOLUME}} -> SetSensitiveDetector(sensDet);
}
"#;

pub const CONSTRUCTION_HH: &str = r#"
#ifndef CONSTRUCTION_HH
#define CONSTRUCTION_HH

#include "G4VUserDetectorConstruction.hh"
#include "G4VPhysicalVolume.hh"
#include "G4LogicalVolume.hh"
#include "G4Box.hh"
#include "G4Tubs.hh"
#include "G4PVPlacement.hh"
#include "G4NistManager.hh"
#include "G4SystemOfUnits.hh"
#include "G4GenericMessenger.hh"

#include "detector.hh"

class MyDetectorConstruction : public G4VUserDetectorConstruction
{
public:
    MyDetectorConstruction();
    ~MyDetectorConstruction();

    G4LogicalVolume *GetScoringVolume() const
    {
        return fScoringVolume;
    }

    virtual G4VPhysicalVolume *Construct();

private:
    virtual void ConstructSDandField();

    G4int nCols, nRows;

    G4Box             *solidWorld, *solidDetector, *solidPMT;
    G4VPhysicalVolume *phys_World, *phys_Detector, *phys_PMT;
    G4LogicalVolume   *logicWorld, *logicDetector, *logicPMT, *fScoringVolume;

    G4GenericMessenger *fMessenger;
    G4Material *worldMat, {{MATERIAL_DECLARATIONS}};

    void DefineMaterials();
};

#endif
"#;

pub const GENERATOR_CC: &str = r#"
#include "generator.hh"

MyPrimaryGenerator::MyPrimaryGenerator()
{
    fParticleGun = new G4ParticleGun(1);

    G4ParticleTable *particleTable = G4ParticleTable::GetParticleTable();
    G4ParticleDefinition *particle = particleTable -> FindParticle("{{PARTICLE}}");

    G4ThreeVector pos(0.,0.,0.);
    G4ThreeVector mom(0.,0.,1.);

    fParticleGun -> SetParticlePosition(pos);
    fParticleGun -> SetParticleMomentumDirection(mom);
    fParticleGun -> SetParticle{{PARTICLE_PROPERTY}}({{PARTICLE_VALUE}});
    fParticleGun -> SetParticleDefinition(particle);
}

MyPrimaryGenerator::~MyPrimaryGenerator()
{
    delete fParticleGun;
}

void MyPrimaryGenerator::GeneratePrimaries(G4Event *anEvent)
{
    fParticleGun -> GeneratePrimaryVertex(anEvent);
}
"#;

/// Photomultiplier grid behind the detector, one tile per row/column cell.
pub const PMT_BLOCK: &str = r#"
    solidPMT = new G4Box("solidPMT", xWorld/nRows, yWorld/nCols, zPMT);
    logicPMT = new G4LogicalVolume(solidPMT, worldMat, "logicPMT");

    for (G4int i = 0; i < nRows; i++)
    {
        for (G4int j = 0; j < nCols; j++)
        {
            phys_PMT = new G4PVPlacement(0, G4ThreeVector((-xWorld + (i+0.5)*(xWorld*2./nRows))*mm, (-yWorld + (j+0.5)*(yWorld*2./nCols))*mm, zWorld-zPMT),
                                         logicPMT, "phys_PMT", logicWorld, false, i * nRows + j, checkOverlaps);
        }
    }
"#;

/// Variables the templates already declare; materials may not reuse them.
pub const RESERVED_NAMES: &[&str] = &[
    "nist",
    "worldMat",
    "nCols",
    "nRows",
    "solidWorld",
    "solidDetector",
    "solidPMT",
    "phys_World",
    "phys_Detector",
    "phys_PMT",
    "logicWorld",
    "logicDetector",
    "logicPMT",
    "fScoringVolume",
    "fMessenger",
    "xWorld",
    "yWorld",
    "zWorld",
    "xDet",
    "yDet",
    "zDet",
    "zPVPd",
    "zPMT",
    "checkOverlaps",
];

/// Substitute every `{{KEY}}` in `template`.
///
/// Fails if a placeholder remains afterwards. Values are inserted verbatim
/// and are not themselves scanned for placeholders.
pub fn render(template: &str, values: &[(&str, &str)]) -> CodegenResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Err(CodegenError::UnfilledPlaceholder {
                placeholder: after.chars().take(32).collect(),
            });
        };
        let key = &after[..end];
        let value = values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| CodegenError::UnfilledPlaceholder {
                placeholder: key.to_string(),
            })?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fills_placeholders() {
        let out = render("a {{X}} b {{Y}}", &[("X", "1"), ("Y", "{{Z}}")]).unwrap();
        assert_eq!(out, "a 1 b {{Z}}");
    }

    #[test]
    fn render_reports_missing_key() {
        assert_eq!(
            render("{{WORLD_MATERIAL}}", &[]),
            Err(CodegenError::UnfilledPlaceholder {
                placeholder: "WORLD_MATERIAL".into()
            })
        );
    }

    #[test]
    fn render_reports_unterminated_placeholder() {
        assert!(render("oops {{X", &[("X", "1")]).is_err());
    }

    #[test]
    fn templates_have_expected_placeholders() {
        for key in ["WORLD_MATERIAL", "MATERIALS", "PMT_BLOCK", "SENSITIVE_VOLUME"] {
            assert!(CONSTRUCTION_CC.contains(&format!("{{{{{key}}}}}")));
        }
        assert!(CONSTRUCTION_HH.contains("{{MATERIAL_DECLARATIONS}}"));
        assert!(GENERATOR_CC.contains("{{PARTICLE_PROPERTY}}"));
    }
}
