mod draw_properties;
