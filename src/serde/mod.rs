mod ser;
