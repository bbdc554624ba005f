mod tests {
    use card_light_composer::topology::{
        BALLS_COLOR_LIST, BALLS_LIST, BALLS_ROW_LIST, BALLS_SWNE_LINE_LIST, LEDS_NUM,
        STARS_COLUMN_LIST, STARS_LIST, TOPPER_LIST, line_leds, line_len,
    };

    fn sorted(mut leds: Vec<u8>) -> Vec<u8> {
        leds.sort_unstable();
        leds
    }

    #[test]
    fn test_groups_cover_every_led_once() {
        let all: Vec<u8> = STARS_LIST
            .iter()
            .chain(&TOPPER_LIST)
            .chain(&BALLS_LIST)
            .copied()
            .collect();
        assert_eq!(sorted(all), (0..LEDS_NUM as u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_lines_cover_balls() {
        let swne = BALLS_SWNE_LINE_LIST.iter().flat_map(|line| line_leds(line)).collect();
        let rows = BALLS_ROW_LIST.iter().flat_map(|row| line_leds(row)).collect();
        let colors = BALLS_COLOR_LIST.iter().flat_map(|list| list.iter().copied()).collect();
        let balls = sorted(BALLS_LIST.to_vec());
        assert_eq!(sorted(swne), balls);
        assert_eq!(sorted(rows), balls);
        assert_eq!(sorted(colors), balls);
    }

    #[test]
    fn test_columns_cover_stars() {
        let columns = STARS_COLUMN_LIST.iter().flat_map(|column| line_leds(column)).collect();
        assert_eq!(sorted(columns), sorted(STARS_LIST.to_vec()));
    }

    #[test]
    fn test_line_len_stops_at_terminator() {
        assert_eq!(line_len(&BALLS_SWNE_LINE_LIST[0]), 2);
        assert_eq!(line_len(&BALLS_SWNE_LINE_LIST[3]), 5);
        assert_eq!(line_len(&BALLS_ROW_LIST[9]), 3);
    }
}
