//! Plain-text rendering of plants for the terminal session.

use crate::models::Plant;

const STREAK: char = '●';
const NO_STREAK: char = '○';

/// Get the streak symbol for a plant.
fn streak_symbol(plant: &Plant) -> char {
    if plant.watering_streak > 0 {
        STREAK
    } else {
        NO_STREAK
    }
}

/// Render the plant list, one line per plant.
///
/// Example output:
/// ```text
/// ├── ● #1 Aloe Vera (Succulent), streak 3
/// └── ○ #2 Boston Fern (Fern), streak 0
/// ```
pub fn render_list(plants: &[Plant]) -> String {
    if plants.is_empty() {
        return "No plants yet\n".to_string();
    }

    let mut output = String::new();
    for (i, plant) in plants.iter().enumerate() {
        let branch = if i == plants.len() - 1 { "└── " } else { "├── " };
        output.push_str(branch);
        output.push(streak_symbol(plant));
        output.push_str(&format!(
            " #{} {} ({}), streak {}\n",
            plant.id, plant.name, plant.plant_type, plant.watering_streak
        ));
    }
    output
}

/// Render every field of one plant.
pub fn render_detail(plant: &Plant) -> String {
    let mut output = format!("#{} {}\n", plant.id, plant.name);
    push_field(&mut output, "Type", &plant.plant_type);
    push_field(&mut output, "Last watered", &plant.last_watered.format("%Y-%m-%d").to_string());
    push_field(&mut output, "Streak", &plant.watering_streak.to_string());
    if !plant.watering_hours.is_empty() {
        push_field(&mut output, "Watering hours", &plant.watering_hours.to_string());
    }
    if !plant.sunlight.is_empty() {
        push_field(&mut output, "Sunlight", &plant.sunlight);
    }
    if let Some(uri) = &plant.image_uri {
        push_field(&mut output, "Image", uri);
    }
    if !plant.notes.is_empty() {
        push_field(&mut output, "Notes", &plant.notes);
    }
    output
}

fn push_field(output: &mut String, label: &str, value: &str) {
    output.push_str("  ");
    output.push_str(label);
    output.push_str(": ");
    output.push_str(value);
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WateringHours;
    use chrono::NaiveDate;

    fn make_plant(id: u64, name: &str, plant_type: &str, streak: u32) -> Plant {
        Plant {
            id,
            name: name.to_string(),
            plant_type: plant_type.to_string(),
            last_watered: NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date"),
            watering_streak: streak,
            image_uri: None,
            watering_hours: WateringHours::new(),
            sunlight: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(render_list(&[]), "No plants yet\n");
    }

    #[test]
    fn test_list() {
        let plants = vec![
            make_plant(1, "Aloe Vera", "Succulent", 3),
            make_plant(2, "Boston Fern", "Fern", 0),
        ];
        assert_eq!(
            render_list(&plants),
            "├── ● #1 Aloe Vera (Succulent), streak 3\n└── ○ #2 Boston Fern (Fern), streak 0\n"
        );
    }

    #[test]
    fn test_detail_skips_empty_fields() {
        let plant = make_plant(4, "Mint", "Herb", 1);
        assert_eq!(
            render_detail(&plant),
            "#4 Mint\n  Type: Herb\n  Last watered: 2026-10-18\n  Streak: 1\n"
        );
    }

    #[test]
    fn test_detail_with_all_fields() {
        let mut plant = make_plant(5, "Monstera", "Indoor Plant", 2);
        plant.watering_hours = WateringHours::parse_all(["07:00", "19:00"]).expect("valid");
        plant.sunlight = "Shade / Low Light".to_string();
        plant.image_uri = Some("content://media/42".to_string());
        plant.notes = "Wipe leaves monthly".to_string();

        let expected = "#5 Monstera\n  Type: Indoor Plant\n  Last watered: 2026-10-18\n  Streak: 2\n  Watering hours: 07:00, 19:00\n  Sunlight: Shade / Low Light\n  Image: content://media/42\n  Notes: Wipe leaves monthly\n";
        assert_eq!(render_detail(&plant), expected);
    }
}
